// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod submission_controller;

#[cfg(test)]
mod submission_controller_tests;

pub use submission_controller::SubmissionController;
