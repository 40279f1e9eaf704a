pub mod companies;
pub mod company_industries;
pub mod industries;
pub mod invoices;
