//! Approximate row counting and size-bounded sampling of partitioned datasets.
//!
//! A handful of randomly chosen partitions are counted exactly, their average
//! is extrapolated to the whole dataset, and the estimate picks a sampling
//! fraction which yields a sample in the hundreds of rows or more. The sample
//! itself is produced by the `Sample` DataFusion operator, locally or on a
//! Ballista cluster.

pub mod codec {
    pub mod extension;
    mod messages;
}

pub mod config {
    pub mod settings;
}

pub mod dataframe {
    pub mod sample;
}

pub mod error;

pub mod estimation {
    pub mod estimator;
    pub mod params;
    pub mod selector;
    pub mod solver;
}

pub mod logical {
    pub mod sample_extension;
}

pub mod physical {
    pub mod sample_exec;
}

pub mod planner {
    pub mod extension_planner;
}

pub mod runner {
    pub mod sampler;
    pub mod session;
}

pub mod storage {
    pub mod lister;
    pub mod location;
    pub mod partition;
    pub mod store;
}
