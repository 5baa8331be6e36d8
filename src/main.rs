use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use atrium::{
    Config, Connector, ConnectorRef, Element, Mediator, Module, ModuleContext, ModuleRegistry,
    Node, QueueConnector, Removal,
};

/// Greets on startup and announces itself over the relay.
struct Greeter {
    ctx: ModuleContext,
    connector: Arc<QueueConnector>,
}

impl Greeter {
    fn new(ctx: ModuleContext) -> Self {
        Self {
            ctx,
            connector: Arc::new(QueueConnector::new()),
        }
    }
}

impl Module for Greeter {
    fn start(&mut self) -> Result<()> {
        let greeting = self.ctx.mediator.get_config_param("greeting")?;
        info!("Greeter {} says {}", self.ctx.id, greeting);

        let origin: ConnectorRef = self.connector.clone();
        self.ctx.mediator.add_connector(origin.clone());
        self.ctx
            .mediator
            .dispatch(&origin, "greeter.ready", &[json!(self.ctx.id.as_str())]);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let origin: ConnectorRef = self.connector.clone();
        self.ctx.mediator.remove_connector(&origin);
        info!("Greeter {} stopped", self.ctx.id);
        Ok(())
    }
}

/// Prints every event the relay hands it.
struct Monitor {
    ctx: ModuleContext,
    connector: Arc<PrintingConnector>,
}

struct PrintingConnector;

impl Connector for PrintingConnector {
    fn emit(&self, event: &str, args: &[serde_json::Value]) -> Result<()> {
        info!("Monitor observed '{}' with {:?}", event, args);
        Ok(())
    }
}

impl Monitor {
    fn new(ctx: ModuleContext) -> Self {
        Self {
            ctx,
            connector: Arc::new(PrintingConnector),
        }
    }
}

impl Module for Monitor {
    fn start(&mut self) -> Result<()> {
        let connector: ConnectorRef = self.connector.clone();
        self.ctx.mediator.add_connector(connector);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let connector: ConnectorRef = self.connector.clone();
        self.ctx.mediator.remove_connector(&connector);
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("atrium=debug")
        .init();

    info!("Starting atrium demo");

    let config = Config::load_or_default()?
        .with("greeting", "hello from atrium")
        .with("retries", 0);

    let registry = Arc::new(ModuleRegistry::new());
    let mediator = Arc::new(Mediator::new(registry.clone(), config));
    registry.bind_mediator(&mediator);

    registry.register_factory("greeter", |ctx| Box::new(Greeter::new(ctx)) as Box<dyn Module>);
    registry.register_factory("monitor", |ctx| Box::new(Monitor::new(ctx)) as Box<dyn Module>);

    // The page: one monitor watching the relay, two greeters announcing.
    let page = Element::new("body");
    for (tag, name) in [("aside", "monitor"), ("section", "greeter"), ("section", "greeter")] {
        let element = Element::new(tag);
        element.set_attr(atrium::constants::MODULE_NAME_ATTR, name);
        page.append_child(Node::Element(element));
    }

    let handles = mediator.add_modules(&Node::Element(page.clone()))?;
    info!("{} modules under management", handles.len());

    mediator.remove_modules(Removal::Scope(Node::Element(page)))?;
    info!("Page released");

    Ok(())
}
