mod common;
mod recommendations;
mod service;
