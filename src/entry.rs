pub mod csv_dialect;
pub mod model;
pub mod parser;
pub mod scraped_dialect;
pub mod script;
