pub mod producer;

pub use producer::EventProducer;
