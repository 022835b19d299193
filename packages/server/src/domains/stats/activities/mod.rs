mod monthly_statistics;
mod overview;

pub use monthly_statistics::{
    monthly_statistics, MonthlyStatistics, MonthlyStatsParams, MonthlySummary,
};
pub use overview::{platform_overview, Overview};
