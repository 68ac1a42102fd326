//! `Sample` logical plan node: keeps each input row with probability `fraction`.
//!
//! The node passes its input schema through unchanged.
use std::hash::Hash;

use datafusion::{
    error::DataFusionError,
    logical_expr::{LogicalPlan, UserDefinedLogicalNodeCore},
};

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Sample {
    pub fraction: f64,
    pub seed: Option<i64>,
    pub input: LogicalPlan,
}

impl Hash for Sample {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.fraction.to_bits().hash(state);
        self.seed.hash(state);
        self.input.hash(state);
    }
}

impl Eq for Sample {}

impl Sample {
    pub fn new(fraction: f64, seed: Option<i64>, input: LogicalPlan) -> Self {
        Self {
            fraction,
            seed,
            input,
        }
    }
}

impl UserDefinedLogicalNodeCore for Sample {
    fn name(&self) -> &str {
        "Sample"
    }

    fn inputs(&self) -> Vec<&LogicalPlan> {
        vec![&self.input]
    }

    fn schema(&self) -> &datafusion::common::DFSchemaRef {
        self.input.schema()
    }

    fn expressions(&self) -> Vec<datafusion::prelude::Expr> {
        vec![]
    }

    fn fmt_for_explain(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Sample: fraction={}, seed={:?}", self.fraction, self.seed)
    }

    fn with_exprs_and_inputs(
        &self,
        _exprs: Vec<datafusion::prelude::Expr>,
        inputs: Vec<LogicalPlan>,
    ) -> datafusion::error::Result<Self> {
        let input = inputs
            .into_iter()
            .next()
            .ok_or(DataFusionError::Plan("Sample expects a single input".to_string()))?;

        Ok(Self::new(self.fraction, self.seed, input))
    }
}
