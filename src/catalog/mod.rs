mod persistence;
mod store;

pub use persistence::{import_foods_csv, load_foods, save_foods};
pub use store::FoodCatalog;
