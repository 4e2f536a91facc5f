pub mod account;
pub mod product;

pub use account::Entity as Account;
pub use product::Entity as Product;
