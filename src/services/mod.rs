// Service exports
pub mod gemini;
pub mod supabase;

pub use gemini::{GeminiClient, GenerationConfig, GenerationError};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
