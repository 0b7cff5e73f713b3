pub mod resource_service;
