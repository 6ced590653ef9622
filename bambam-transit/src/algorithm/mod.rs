pub mod fusion;
