mod editor_utils;

pub use editor_utils::{create_editor_buffer, resolve_editor};
