pub mod html;
pub mod json;
pub mod markdown;
pub mod terminal;

use crate::aggregator::SecurityReport;

pub trait Reporter {
    fn report(&self, report: &SecurityReport) -> String;
}
