pub mod llm_provider;
