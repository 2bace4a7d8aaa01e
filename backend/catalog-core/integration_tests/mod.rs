mod details;
mod gog;
mod helpers;
mod search;
mod token;
