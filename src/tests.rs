
mod invalid;
mod mutation;
mod valid;
