// Tests for SimulationEngine functionality
#[cfg(test)]
mod tests {
    use crate::core::address_space::SinkEvent;
    use crate::core::errors::SimulationError;
    use crate::core::execution::{SimulationEngine, SimulatorConfig, ValueGenerator};
    use crate::core::tests::build_from_xml;
    use crate::core::types::{StatusCode, VariableKey};
    use crate::core::values::{SemanticType, TagValue};
    use std::time::Duration;

    fn engine_for(xml: &str) -> (SimulationEngine, std::sync::Arc<crate::core::address_space::RecordingSink>) {
        let (tree, sink, _report) = build_from_xml(xml);
        let config = SimulatorConfig::new().with_seed(11);
        let engine = SimulationEngine::new(tree, sink.clone(), &config);
        sink.clear();
        (engine, sink)
    }

    #[test]
    fn test_static_variables_never_change() {
        let (mut engine, sink) = engine_for(
            r#"<H><Folder Name="A">
                <Variable Name="Setpoint" DataType="Double" InitialValue="12.5" IsStatic="true" />
                <Variable Name="Noise" DataType="Double" />
            </Folder></H>"#,
        );
        let setpoint = engine.tree().find_by_name("Setpoint").unwrap().snapshot();

        for _ in 0..10 {
            let report = engine.tick();
            assert_eq!(report.skipped_static, 1);
            assert_eq!(report.updated, 1);
        }

        let tree = engine.tree();
        let after = tree.find_by_name("Setpoint").unwrap();
        assert_eq!(after.snapshot(), setpoint);
        assert!(sink.changes_for(after.node_id()).is_empty());
        assert_eq!(sink.change_count(), 10);
    }

    #[test]
    fn test_integer_counter_wraps_past_bound() {
        let (mut engine, _sink) = engine_for(
            r#"<H><Folder Name="A"><Variable Name="Count" DataType="Integer" MaxValue="3" /></Folder></H>"#,
        );

        let mut seen = Vec::new();
        for _ in 0..7 {
            engine.tick();
            seen.push(engine.tree().find_by_name("Count").unwrap().value().unwrap());
        }

        let expected: Vec<TagValue> = [1, 2, 3, 1, 2, 3, 1].iter().map(|v| TagValue::Integer(*v)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_integer_counter_is_shared_across_variables() {
        let (mut engine, _sink) = engine_for(
            r#"<H><Folder Name="A">
                <Variable Name="First" DataType="Integer" />
                <Variable Name="Second" DataType="Integer" />
            </Folder></H>"#,
        );

        engine.tick();
        engine.tick();

        let tree = engine.tree();
        assert_eq!(tree.find_by_name("First").unwrap().value(), Some(TagValue::Integer(3)));
        assert_eq!(tree.find_by_name("Second").unwrap().value(), Some(TagValue::Integer(4)));
        assert_eq!(engine.generator().counter(), 4);
    }

    #[test]
    fn test_demo_temp_scenario_after_one_tick() {
        let (mut engine, _sink) = engine_for(
            r#"<H><Folder Name="Demo"><Variable Name="Temp" DataType="Double" InitialValue="21.5" MaxValue="50" /></Folder></H>"#,
        );
        let key = VariableKey::new("Temp", false, 50);
        let before = engine.tree().find(&key).unwrap().snapshot();
        assert_eq!(before.value, Some(TagValue::Double(21.5)));
        assert_eq!(before.status, StatusCode::Good);

        std::thread::sleep(Duration::from_millis(5));
        engine.tick();

        let after = engine.tree().find(&key).unwrap().snapshot();
        let value = after.value.and_then(|v| v.as_f64()).unwrap();
        assert!((0.0..=50.0).contains(&value));
        assert!(after.timestamp > before.timestamp);
        assert_eq!(after.status, StatusCode::Good);
    }

    #[test]
    fn test_generated_values_stay_in_domain() {
        let (mut engine, _sink) = engine_for(
            r#"<H><Folder Name="A">
                <Variable Name="Flag" DataType="Boolean" />
                <Variable Name="Level" DataType="Int32" MaxValue="7" />
                <Variable Name="Tag" DataType="String" MaxValue="4" />
                <Variable Name="Ratio" DataType="Double" MaxValue="30" />
            </Folder></H>"#,
        );

        for _ in 0..200 {
            engine.tick();
            let tree = engine.tree();

            assert!(tree.find_by_name("Flag").unwrap().value().unwrap().as_bool().is_some());

            let level = tree.find_by_name("Level").unwrap().value().unwrap().as_i64().unwrap();
            assert!((0..7).contains(&level));

            let tag = tree.find_by_name("Tag").unwrap().value().unwrap();
            let n: i32 = tag.as_str().unwrap().strip_prefix("Invalid_").unwrap().parse().unwrap();
            assert!((0..4).contains(&n));

            let ratio = tree.find_by_name("Ratio").unwrap().value().unwrap().as_f64().unwrap();
            assert!((0.0..=30.0).contains(&ratio));
        }
    }

    #[test]
    fn test_types_without_rule_become_null_but_stay_good() {
        let (mut engine, sink) = engine_for(
            r#"<H><Folder Name="A">
                <Variable Name="Gain" DataType="Float" InitialValue="1.5" />
                <Variable Name="Started" DataType="DateTime" InitialValue="2025-02-19T10:00:00Z" />
                <Variable Name="Raw" DataType="Byte" InitialValue="7" />
            </Folder></H>"#,
        );
        assert_eq!(
            engine.tree().find_by_name("Raw").unwrap().data_type(),
            &SemanticType::Unsupported("Byte".to_string())
        );

        let report = engine.tick();
        assert_eq!(report.updated, 3);
        assert!(report.failure.is_none());

        for (_, variable) in engine.tree().variables() {
            assert_eq!(variable.value(), None);
            assert_eq!(variable.status(), StatusCode::Good);
        }
        assert_eq!(sink.change_count(), 3);
    }

    #[test]
    fn test_failure_degrades_variable_in_flight_and_abandons_tick() {
        let (mut engine, sink) = engine_for(
            r#"<H><Folder Name="A">
                <Variable Name="A" DataType="Int32" InitialValue="-1" MaxValue="10" />
                <Variable Name="B" DataType="Int32" InitialValue="-1" MaxValue="10" />
                <Variable Name="C" DataType="Int32" InitialValue="5" MaxValue="-1" />
                <Variable Name="D" DataType="Int32" InitialValue="-1" MaxValue="10" />
            </Folder></H>"#,
        );
        let tree = engine.tree().clone();
        let d_before = tree.find_by_name("D").unwrap().snapshot();

        std::thread::sleep(Duration::from_millis(2));
        let report = engine.tick();

        let failure = report.failure.expect("tick reports a failure");
        let (c_handle, _) = tree.variables().nth(2).unwrap();
        assert_eq!(failure.variable, c_handle);
        assert_eq!(
            failure.error,
            SimulationError::InvalidBound {
                data_type: SemanticType::Int32,
                max_value: -1
            }
        );
        assert_eq!(report.updated, 2);

        for name in ["A", "B"] {
            let snapshot = tree.find_by_name(name).unwrap().snapshot();
            let value = snapshot.value.and_then(|v| v.as_i64()).unwrap();
            assert!((0..10).contains(&value));
            assert_eq!(snapshot.status, StatusCode::Good);
            assert!(snapshot.timestamp > d_before.timestamp);
        }

        let c = tree.find_by_name("C").unwrap();
        let c_snapshot = c.snapshot();
        assert_eq!(c_snapshot.value, None);
        assert_eq!(c_snapshot.status, StatusCode::Bad);
        assert!(c_snapshot.timestamp > d_before.timestamp);
        assert_eq!(
            sink.changes_for(c.node_id()),
            vec![SinkEvent::Changed {
                node_id: c.node_id().clone(),
                value: None,
                status: StatusCode::Bad,
            }]
        );

        // Rest of the tick is abandoned
        assert_eq!(tree.find_by_name("D").unwrap().snapshot(), d_before);

        // The engine keeps ticking afterwards
        let next = engine.tick();
        assert_eq!(next.tick, 2);
        assert!(next.failure.is_some());
        assert_eq!(engine.current_tick(), 2);
    }

    #[test]
    fn test_negative_double_bound_degrades_variable() {
        let (mut engine, sink) = engine_for(
            r#"<H><Folder Name="A"><Variable Name="T" DataType="Double" InitialValue="3.5" MaxValue="-5" /></Folder></H>"#,
        );

        let report = engine.tick();

        let failure = report.failure.expect("negative bound fails the tick");
        assert_eq!(
            failure.error,
            SimulationError::InvalidBound {
                data_type: SemanticType::Double,
                max_value: -5
            }
        );
        assert_eq!(report.updated, 0);

        let t = engine.tree().find_by_name("T").unwrap();
        assert_eq!(t.value(), None);
        assert_eq!(t.status(), StatusCode::Bad);
        assert_eq!(sink.changes_for(t.node_id()).len(), 1);
    }

    #[test]
    fn test_injected_generator_counter_is_used() {
        let (tree, sink, _report) = build_from_xml(
            r#"<H><Folder Name="A"><Variable Name="Count" DataType="Integer" MaxValue="100" /></Folder></H>"#,
        );
        let mut generator = ValueGenerator::new(Some(5));
        for _ in 0..41 {
            generator.generate(&SemanticType::Integer, 100).unwrap();
        }

        let mut engine =
            SimulationEngine::with_generator(tree, sink, generator, Duration::from_millis(10));
        engine.tick();
        assert_eq!(
            engine.tree().find_by_name("Count").unwrap().value(),
            Some(TagValue::Integer(42))
        );

        engine.generator_mut().reset_counter();
        engine.tick();
        assert_eq!(
            engine.tree().find_by_name("Count").unwrap().value(),
            Some(TagValue::Integer(1))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_ticks_until_shutdown() {
        let (tree, sink, _report) = build_from_xml(
            r#"<H><Folder Name="A"><Variable Name="Count" DataType="Integer" /></Folder></H>"#,
        );
        let config = SimulatorConfig::new().with_update_interval_ms(1000).with_seed(1);
        let mut engine = SimulationEngine::new(tree, sink, &config);

        let ticks = engine.run(tokio::time::sleep(Duration::from_millis(2500))).await;

        // Ticks at 0ms, 1000ms and 2000ms
        assert_eq!(ticks, 3);
        assert_eq!(
            engine.tree().find_by_name("Count").unwrap().value(),
            Some(TagValue::Integer(3))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_engine_stops_on_signal() {
        let (tree, sink, _report) = build_from_xml(
            r#"<H><Folder Name="A"><Variable Name="Flag" DataType="Boolean" /></Folder></H>"#,
        );
        let config = SimulatorConfig::new().with_update_interval_ms(1000);
        let engine = SimulationEngine::new(tree.clone(), sink.clone(), &config);

        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let handle = engine.spawn(async move {
            let _ = stop_rx.await;
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        stop_tx.send(()).unwrap();

        let ticks = handle.await.unwrap();
        assert_eq!(ticks, 2);
        assert_eq!(sink.change_count(), 2);
    }
}
