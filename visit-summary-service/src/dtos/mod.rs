pub mod summary;
pub mod visits;

pub use summary::{DaySummaryResponse, HelloResponse};
pub use visits::{PatientDetails, PatientVisit, VisitDetails};
