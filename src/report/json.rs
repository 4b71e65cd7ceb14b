use crate::types::report::CompletionReport;

pub fn to_json(report: &CompletionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
