#[cfg(test)]
mod test {
    use std::sync::Arc;

    use datafusion::{
        arrow::array::RecordBatch, assert_batches_sorted_eq, execution::SessionStateBuilder,
        physical_plan::displayable, prelude::SessionConfig, prelude::SessionContext,
    };
    use datafusion_proto::bytes::{
        logical_plan_from_bytes_with_extension_codec, logical_plan_to_bytes_with_extension_codec,
        physical_plan_from_bytes_with_extension_codec, physical_plan_to_bytes_with_extension_codec,
    };

    use partition_sampler::{
        codec::extension::{ExtendedBallistaLogicalCodec, ExtendedBallistaPhysicalCodec},
        dataframe::sample::DataFrameExt,
        planner::extension_planner::QueryPlannerWithExtensions,
    };

    const NUMBERS: &str = "select unnest([1, 2, 3, 4, 5, 6, 7, 8, 9, 0]) as a";

    #[tokio::test]
    async fn should_keep_every_row_with_full_fraction() -> datafusion::error::Result<()> {
        let ctx = context();
        let result = ctx.sql(NUMBERS).await?.sample(1.0, Some(33))?.collect().await?;

        let expected = vec![
            "+---+", "| a |", "+---+", "| 0 |", "| 1 |", "| 2 |", "| 3 |", "| 4 |", "| 5 |",
            "| 6 |", "| 7 |", "| 8 |", "| 9 |", "+---+",
        ];

        assert_batches_sorted_eq!(expected, &result);

        Ok(())
    }

    #[tokio::test]
    async fn should_sample_repeatably_with_seed() -> datafusion::error::Result<()> {
        let ctx = context();
        let first = ctx.sql(NUMBERS).await?.sample(0.5, Some(33))?.collect().await?;
        let second = ctx.sql(NUMBERS).await?.sample(0.5, Some(33))?.collect().await?;

        let rows: usize = first.iter().map(RecordBatch::num_rows).sum();

        assert_eq!(pretty(&first), pretty(&second));
        assert!(rows <= 10);

        Ok(())
    }

    #[tokio::test]
    async fn should_be_in_range() -> datafusion::error::Result<()> {
        let ctx = context();
        let df = ctx.sql(NUMBERS).await?;

        assert!(df.clone().sample(0.0, Some(33)).is_err());
        assert!(df.clone().sample(-0.01, Some(33)).is_err());
        assert!(df.clone().sample(1.01, Some(33)).is_err());
        assert!(df.clone().sample(f64::NAN, Some(33)).is_err());
        assert!(df.clone().sample(0.00001, None).is_ok());
        assert!(df.clone().sample(1.0, Some(33)).is_ok());
        assert!(df.sample(1.0, Some(-1)).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn should_round_trip_logical_plan() -> datafusion::error::Result<()> {
        let ctx = context();
        let codec = ExtendedBallistaLogicalCodec::default();
        let result = ctx.sql(NUMBERS).await?.sample(0.001, Some(33))?;

        let plan = result.logical_plan();
        let bytes = logical_plan_to_bytes_with_extension_codec(plan, &codec)?;
        let new_plan = logical_plan_from_bytes_with_extension_codec(&bytes, &ctx, &codec)?;

        assert_eq!(plan, &new_plan);

        Ok(())
    }

    #[tokio::test]
    async fn should_round_trip_physical_plan() -> datafusion::error::Result<()> {
        let ctx = context();
        let codec = ExtendedBallistaPhysicalCodec::default();
        let result = ctx.sql(NUMBERS).await?.sample(0.5, None)?;

        let plan = result.create_physical_plan().await?;
        let bytes = physical_plan_to_bytes_with_extension_codec(plan.clone(), &codec)?;
        let new_plan = physical_plan_from_bytes_with_extension_codec(&bytes, &ctx, &codec)?;

        let plan_formatted = format!("{}", displayable(plan.as_ref()).indent(false));
        let new_plan_formatted = format!("{}", displayable(new_plan.as_ref()).indent(false));

        assert!(plan_formatted.contains("SampleExec: fraction=0.5, seed=None"));
        assert_eq!(plan_formatted, new_plan_formatted);

        Ok(())
    }

    fn pretty(batches: &[RecordBatch]) -> String {
        datafusion::arrow::util::pretty::pretty_format_batches(batches)
            .map(|table| table.to_string())
            .unwrap_or_default()
    }

    fn context() -> SessionContext {
        let query_planner = Arc::new(QueryPlannerWithExtensions::default());

        let state = SessionStateBuilder::new()
            .with_config(SessionConfig::new().with_target_partitions(1))
            .with_query_planner(query_planner)
            .with_default_features()
            .build();

        SessionContext::new_with_state(state)
    }
}
