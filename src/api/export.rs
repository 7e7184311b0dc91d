//! Server-rendered Excel and PDF exports.
//!
//! Generation stays on the server; the client only downloads the binary
//! blob and suggests a file name for it.

use crate::{
    client::{Method, PubTracker, Query, build_request, error_from_response},
    error::Result,
};
use chrono::NaiveDate;
use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportParam {
    /// Whole dataset as a multi-sheet workbook.
    AllExcel,
    /// Whole dataset as a PDF report.
    AllPdf,
    /// Publications dated strictly after `since`.
    FilteredExcel { since: NaiveDate },
    FilteredPdf { since: NaiveDate },
    /// Publications whose authors span multiple groups.
    MultiGroupExcel,
    MultiGroupPdf,
    /// Per-group, per-author multi-group paper counts.
    GroupAuthorMultiGroupExcel,
    GroupAuthorMultiGroupPdf,
}

impl ExportParam {
    fn path(&self) -> &'static str {
        match self {
            ExportParam::AllExcel => "/export-excel/",
            ExportParam::AllPdf => "/export-pdf/",
            ExportParam::FilteredExcel { .. } => "/export-excel-filtered/",
            ExportParam::FilteredPdf { .. } => "/export-pdf-filtered/",
            ExportParam::MultiGroupExcel => "/export-multigroup-excel/",
            ExportParam::MultiGroupPdf => "/export-multigroup-pdf/",
            ExportParam::GroupAuthorMultiGroupExcel => "/export-group-author-multigroup-excel/",
            ExportParam::GroupAuthorMultiGroupPdf => "/export-group-author-multigroup-pdf/",
        }
    }

    fn since(&self) -> Option<NaiveDate> {
        match self {
            ExportParam::FilteredExcel { since } | ExportParam::FilteredPdf { since } => {
                Some(*since)
            }
            _ => None,
        }
    }

    /// File name for saving the downloaded blob, mirroring what the server
    /// puts in its Content-Disposition header.
    pub fn suggested_file_name(&self) -> String {
        match self {
            ExportParam::AllExcel => "all_data.xlsx".to_owned(),
            ExportParam::AllPdf => "all_data.pdf".to_owned(),
            ExportParam::FilteredExcel { since } => {
                format!("filtered_publications_{}.xlsx", since.format("%Y-%m-%d"))
            }
            ExportParam::FilteredPdf { since } => {
                format!("filtered_publications_{}.pdf", since.format("%Y-%m-%d"))
            }
            ExportParam::MultiGroupExcel => "multi_group_publications.xlsx".to_owned(),
            ExportParam::MultiGroupPdf => "multi_group_publications.pdf".to_owned(),
            ExportParam::GroupAuthorMultiGroupExcel => "group_author_multigroup.xlsx".to_owned(),
            ExportParam::GroupAuthorMultiGroupPdf => "group_author_multigroup.pdf".to_owned(),
        }
    }
}

impl Query for ExportParam {
    type Response = Vec<u8>;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let mut req_builder = build_request(client, Method::Get, self.path());
        if let Some(since) = self.since() {
            req_builder = req_builder.query(&[("since", since.format("%Y-%m-%d").to_string())]);
        }
        let resp = req_builder.send().await?;
        match resp.status() {
            StatusCode::OK => Ok(resp.bytes().await?.to_vec()),
            status => Err(error_from_response(status, resp).await),
        }
    }
}
