mod common;
mod compatibility;
mod matching;
mod proposals;
mod similarity;
