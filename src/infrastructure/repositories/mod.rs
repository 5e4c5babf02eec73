mod mysql;
mod postgres;
mod school_row;
mod traits;

pub use mysql::MySqlSchoolRepository;
pub use postgres::PgSchoolRepository;
pub use traits::SchoolRepository;
