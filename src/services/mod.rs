pub mod process_service;
