mod common;
mod cost;
mod rules;
