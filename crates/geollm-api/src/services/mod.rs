mod tools;

pub use tools::ToolService;
