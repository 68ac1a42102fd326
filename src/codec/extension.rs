//! Ballista codecs for the `Sample` plan nodes.
//!
//! When the sampled read runs on a Ballista cluster the logical plan travels
//! from the client to the scheduler and the physical plan from the scheduler to
//! the executors. [ExtendedBallistaLogicalCodec] encodes [Sample] and
//! [ExtendedBallistaPhysicalCodec] encodes [SampleExec] as protobuf messages;
//! everything else is delegated to the built-in Ballista codecs. Physical nodes
//! unknown to this codec are wrapped as opaque bytes.
use std::sync::Arc;

use ballista_core::serde::{BallistaLogicalExtensionCodec, BallistaPhysicalExtensionCodec};
use datafusion::{
    arrow::datatypes::SchemaRef,
    catalog::TableProvider,
    common::plan_err,
    error::DataFusionError,
    execution::FunctionRegistry,
    logical_expr::{Extension, LogicalPlan},
    physical_plan::ExecutionPlan,
    prelude::SessionContext,
    sql::TableReference,
};
use datafusion_proto::{
    logical_plan::LogicalExtensionCodec, physical_plan::PhysicalExtensionCodec,
};
use prost::Message;

use crate::{logical::sample_extension::Sample, physical::sample_exec::SampleExec};

use super::messages::{LMessage, LSample, PMessage, PSample, l_message, p_message};

fn codec_error(e: impl ToString) -> DataFusionError {
    DataFusionError::Internal(e.to_string())
}

#[derive(Debug, Default)]
pub struct ExtendedBallistaLogicalCodec {
    inner: BallistaLogicalExtensionCodec,
}

impl LogicalExtensionCodec for ExtendedBallistaLogicalCodec {
    fn try_decode(
        &self,
        buf: &[u8],
        inputs: &[LogicalPlan],
        _ctx: &SessionContext,
    ) -> datafusion::error::Result<Extension> {
        let message = LMessage::decode(buf).map_err(codec_error)?;

        match message.extension {
            Some(l_message::Extension::Sample(LSample { fraction, seed })) => {
                let input = inputs
                    .first()
                    .ok_or(DataFusionError::Plan("expected input".to_string()))?
                    .clone();

                Ok(Extension {
                    node: Arc::new(Sample::new(fraction, seed, input)),
                })
            }
            None => plan_err!("Can't decode logical extension"),
        }
    }

    fn try_encode(&self, node: &Extension, buf: &mut Vec<u8>) -> datafusion::error::Result<()> {
        if let Some(Sample { seed, fraction, .. }) = node.node.as_any().downcast_ref::<Sample>() {
            let message = LMessage {
                extension: Some(l_message::Extension::Sample(LSample {
                    fraction: *fraction,
                    seed: *seed,
                })),
            };

            message.encode(buf).map_err(codec_error)
        } else {
            self.inner.try_encode(node, buf)
        }
    }

    fn try_decode_table_provider(
        &self,
        buf: &[u8],
        table_ref: &TableReference,
        schema: SchemaRef,
        ctx: &SessionContext,
    ) -> datafusion::error::Result<Arc<dyn TableProvider>> {
        self.inner
            .try_decode_table_provider(buf, table_ref, schema, ctx)
    }

    fn try_encode_table_provider(
        &self,
        table_ref: &TableReference,
        node: Arc<dyn TableProvider>,
        buf: &mut Vec<u8>,
    ) -> datafusion::error::Result<()> {
        self.inner.try_encode_table_provider(table_ref, node, buf)
    }
}

#[derive(Debug, Default)]
pub struct ExtendedBallistaPhysicalCodec {
    inner: BallistaPhysicalExtensionCodec,
}

impl PhysicalExtensionCodec for ExtendedBallistaPhysicalCodec {
    fn try_decode(
        &self,
        buf: &[u8],
        inputs: &[Arc<dyn ExecutionPlan>],
        registry: &dyn FunctionRegistry,
    ) -> datafusion::error::Result<Arc<dyn ExecutionPlan>> {
        let message = PMessage::decode(buf).map_err(codec_error)?;

        match message.extension {
            Some(p_message::Extension::Sample(PSample { fraction, seed })) => {
                let input = inputs
                    .first()
                    .ok_or(DataFusionError::Plan("expected input".to_string()))?
                    .clone();

                Ok(Arc::new(SampleExec::new(fraction, seed, input)))
            }
            Some(p_message::Extension::Opaque(opaque)) => {
                self.inner.try_decode(&opaque, inputs, registry)
            }
            None => plan_err!("Can't decode physical extension"),
        }
    }

    fn try_encode(
        &self,
        node: Arc<dyn ExecutionPlan>,
        buf: &mut Vec<u8>,
    ) -> datafusion::error::Result<()> {
        let extension = if let Some(SampleExec { fraction, seed, .. }) =
            node.as_any().downcast_ref::<SampleExec>()
        {
            p_message::Extension::Sample(PSample {
                fraction: *fraction,
                seed: *seed,
            })
        } else {
            let mut opaque = vec![];
            self.inner.try_encode(node, &mut opaque)?;
            p_message::Extension::Opaque(opaque)
        };

        PMessage {
            extension: Some(extension),
        }
        .encode(buf)
        .map_err(codec_error)
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::super::messages::{LSample, PMessage, p_message};

    #[test]
    fn should_keep_absent_seed_apart_from_zero() {
        let unseeded = LSample {
            fraction: 0.25,
            seed: None,
        };
        let zero = LSample {
            fraction: 0.25,
            seed: Some(0),
        };

        assert_ne!(unseeded.encode_to_vec(), zero.encode_to_vec());
        assert_eq!(
            None,
            LSample::decode(unseeded.encode_to_vec().as_slice())
                .unwrap()
                .seed
        );
        assert_eq!(
            Some(0),
            LSample::decode(zero.encode_to_vec().as_slice()).unwrap().seed
        );
    }

    #[test]
    fn should_carry_opaque_physical_nodes() {
        let message = PMessage {
            extension: Some(p_message::Extension::Opaque(vec![1, 2, 3])),
        };

        let decoded = PMessage::decode(message.encode_to_vec().as_slice()).unwrap();

        assert_eq!(
            Some(p_message::Extension::Opaque(vec![1, 2, 3])),
            decoded.extension
        );
    }
}
