mod details;
mod query;
mod search;
mod store;
mod store_links;
