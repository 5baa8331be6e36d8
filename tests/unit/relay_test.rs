#[cfg(test)]
mod relay_tests {
    use anyhow::anyhow;
    use atrium::{Config, ConnectorRef, FnConnector, Mediator, QueueConnector};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    use crate::common::mocks::MockHost;

    fn mediator() -> Mediator {
        Mediator::new(Arc::new(MockHost::new()), Config::new())
    }

    #[test]
    fn test_relay_preserves_insertion_order() {
        let mediator = mediator();
        let origin: ConnectorRef = Arc::new(QueueConnector::new());

        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let order = order.clone();
            mediator.add_connector(Arc::new(FnConnector::new(move |_, _| {
                order.lock().unwrap().push(label);
                Ok(())
            })));
        }

        mediator.dispatch(&origin, "tick", &[]);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_every_endpoint_receives_the_same_arguments() {
        let mediator = mediator();
        let origin: ConnectorRef = Arc::new(QueueConnector::new());

        let first = Arc::new(QueueConnector::new());
        let second = Arc::new(QueueConnector::new());
        mediator.add_connector(first.clone());
        mediator.add_connector(second.clone());

        let args = [json!({"page": 2}), json!("forward")];
        mediator.dispatch(&origin, "paginate", &args);

        for connector in [first, second] {
            let received = connector.drain();
            assert_eq!(received.len(), 1);
            assert_eq!(received[0].event, "paginate");
            assert_eq!(received[0].args, args.to_vec());
        }
    }

    #[test]
    fn test_failing_endpoint_does_not_starve_the_rest() {
        let mediator = mediator();
        let origin: ConnectorRef = Arc::new(QueueConnector::new());

        let tail = Arc::new(QueueConnector::new());
        mediator.add_connector(Arc::new(FnConnector::new(|_, _| Err(anyhow!("broken")))));
        mediator.add_connector(Arc::new(FnConnector::new(|_, _| Err(anyhow!("also broken")))));
        mediator.add_connector(tail.clone());

        mediator.dispatch(&origin, "tick", &[]);
        mediator.dispatch(&origin, "tock", &[]);

        let events: Vec<String> = tail.drain().into_iter().map(|b| b.event).collect();
        assert_eq!(events, vec!["tick", "tock"]);
    }

    #[test]
    fn test_content_equal_endpoints_are_not_excluded() {
        let mediator = mediator();

        // Two distinct but identically-shaped endpoints: only the literal
        // origin instance is excluded.
        let origin = Arc::new(QueueConnector::new());
        let twin = Arc::new(QueueConnector::new());
        let origin_ref: ConnectorRef = origin.clone();
        mediator.add_connector(origin_ref.clone());
        mediator.add_connector(twin.clone());

        mediator.dispatch(&origin_ref, "tick", &[]);

        assert!(origin.is_empty());
        assert_eq!(twin.len(), 1);
    }

    #[test]
    fn test_dispatch_chains() {
        let mediator = mediator();
        let origin: ConnectorRef = Arc::new(QueueConnector::new());
        let listener = Arc::new(QueueConnector::new());
        mediator.add_connector(listener.clone());

        mediator
            .dispatch(&origin, "first", &[])
            .dispatch(&origin, "second", &[]);

        assert_eq!(listener.len(), 2);
    }
}
