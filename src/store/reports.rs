//! Report store.
//!
//! A report is just a moderation flag; there is no workflow state beyond
//! existence, so resolving one is deleting it.

use crate::models::{NewReport, Report};
use crate::store::{Resource, Store};

pub struct Reports;

impl Resource for Reports {
    const PATH: &'static str = "/reports";
    type Item = Report;
    type Create = NewReport;
    type Update = NewReport;
}

pub type ReportStore = Store<Reports>;
