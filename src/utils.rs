mod seq_id_generator;

pub use seq_id_generator::SeqIdGenerator;
