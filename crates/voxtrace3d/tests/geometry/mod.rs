mod clip_idempotence;
mod combine_equivalence;
mod distance_conservation;
mod error_paths;
mod truth_rasterization;
mod wall_fold;
mod worked_example;
