pub mod certificate_fetch;
pub mod create;
pub mod detail;
pub mod list;

pub use certificate_fetch::{CertificateFetchModal, FetchClosed};
pub use create::CreateView;
pub use detail::DetailView;
pub use list::{ListView, contract_table};
