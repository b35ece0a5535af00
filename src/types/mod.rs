// Type definitions: db entities, API DTOs, internal shapes
pub mod db;
pub mod dto;
pub mod internal;
