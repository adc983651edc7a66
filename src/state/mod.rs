pub mod compute;
pub mod numeric;
pub mod row;
pub mod session;
pub mod table;
pub mod workbook;
