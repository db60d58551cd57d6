mod record;
mod repository;

pub use record::{CreditCollection, CreditCollectionEntry, CreditSale, CreditSaleEntry, Customer, CustomerEntry};
pub use repository::CreditRepository;
