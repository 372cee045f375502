pub mod health_entry_mapper;
