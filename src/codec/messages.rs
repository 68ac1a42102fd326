// Protobuf messages carrying the `Sample` node between Ballista client,
// scheduler and executors, generated from `proto/extension.proto`.
include!(concat!(env!("OUT_DIR"), "/partition_sampler.extension.rs"));
