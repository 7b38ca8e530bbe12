mod advanced;
mod search;
