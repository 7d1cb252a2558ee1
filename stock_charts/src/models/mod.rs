pub mod chart;
pub mod field;
pub mod record;
pub mod request;
pub mod selection;
pub mod series;
