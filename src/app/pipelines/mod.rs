pub mod match_report;
