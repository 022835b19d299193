pub mod month;
pub mod monthly_counts;

pub use month::Month;
pub use monthly_counts::MonthlyCount;
