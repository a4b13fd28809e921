pub const REPORT_HEADER: &str = "Shopping list:";
pub const REPORT_FILENAME: &str = "shopping_list.txt";
pub const REPORT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// One aggregated ingredient in the rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub ingredient_id: String,
    pub name: String,
    pub total_amount: u64,
    pub measurement_unit: String,
}

/// The rendered shopping list plus what the HTTP layer needs to serve it as
/// a file download.
#[derive(Debug, Clone)]
pub struct ShoppingReport {
    pub body: String,
    pub filename: &'static str,
    pub content_type: &'static str,
}

impl ShoppingReport {
    pub(crate) fn render(lines: &[ReportLine]) -> Self {
        let items = lines
            .iter()
            .map(|line| {
                format!(
                    "{} - {} {}.",
                    line.name, line.total_amount, line.measurement_unit
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            body: format!("{REPORT_HEADER}\n{items}"),
            filename: REPORT_FILENAME,
            content_type: REPORT_CONTENT_TYPE,
        }
    }
}
