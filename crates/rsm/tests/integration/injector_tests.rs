//! Injector Tests

use rsm::application::{
    InjectedFn, Injector, Provider, provide_component, provide_element_props, provide_parent,
    provide_service, provide_service_state, provide_symbol, provide_value, provider,
};
use rsm::infrastructure::AppContext;
use rsm::infrastructure::config::ConfigBuilder;
use rsm::providers::dom::{MemoryDocument, MemoryElement};
use rsm::providers::loader::StaticModuleLoader;
use rsm::providers::services::MemoryServiceLocator;
use rsm::{Document, Error, KeyProps, Result, Value};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Counter {
    count: u32,
}

/// Document with `main[::injector] > section[::injector ::counter] > button`
struct Fixture {
    context: AppContext,
    locator: Arc<MemoryServiceLocator>,
    root: Arc<MemoryElement>,
    section: Arc<MemoryElement>,
    button: Arc<MemoryElement>,
}

fn fixture() -> Fixture {
    let document = MemoryDocument::new("https://app/");
    let loader = StaticModuleLoader::new()
        .with_module("https://app/widget.js", [("render", Value::new("render-fn"))]);
    let locator = Arc::new(MemoryServiceLocator::new());
    let context = AppContext::build(
        ConfigBuilder::new().build(),
        Arc::new(loader),
        locator.clone(),
        Some(document.clone() as Arc<dyn Document>),
    )
    .unwrap();

    let root = document.create_element("main");
    root.set_attribute("::injector", "");
    root.set_attribute("theme", "dark");
    let section = document.create_element("section");
    section.set_attribute("::injector", "");
    section.set_attribute("::counter", "counter:c1");
    section.set_attribute("user-id", "u1");
    let button = document.create_element("button");
    root.append_child(&section);
    section.append_child(&button);

    Fixture {
        context,
        locator,
        root,
        section,
        button,
    }
}

impl Fixture {
    fn injector(&self) -> Injector {
        self.context.injector_for(self.button.as_node()).unwrap()
    }
}

async fn collect_u32(_receiver: Option<Value>, args: Vec<Value>) -> Result<Value> {
    let numbers: Vec<u32> = args
        .iter()
        .filter_map(|arg| arg.downcast_ref::<u32>().copied())
        .collect();
    Ok(Value::new(numbers))
}

fn delayed(n: u32, delay_ms: u64, log: Arc<Mutex<Vec<u32>>>) -> Provider {
    provider(move |_| {
        let log = Arc::clone(&log);
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            log.lock().unwrap().push(n);
            Ok(Value::new(n))
        }
    })
}

fn failing(message: &'static str, delay_ms: u64) -> Provider {
    provider(move |_| async move {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Err(Error::service("failing", message))
    })
}

fn numbers(value: &Value) -> Vec<u32> {
    value.downcast_ref::<Vec<u32>>().cloned().unwrap()
}

#[tokio::test]
async fn test_plain_callable_is_applied_directly() {
    let f = fixture();
    let plain = InjectedFn::plain(|receiver: Option<Value>, args: Vec<Value>| async move {
        assert!(receiver.is_none());
        collect_u32(None, args).await
    });

    let result = f
        .injector()
        .call(&plain, Some(Value::new(Counter { count: 0 })), vec![Value::new(7u32)])
        .await
        .unwrap();

    assert_eq!(numbers(&result), vec![7]);
    assert!(plain.decl_site().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_args_keep_declaration_order_despite_reverse_settlement() {
    let f = fixture();
    let log = Arc::new(Mutex::new(Vec::new()));
    let injected = InjectedFn::builder()
        .provider(delayed(0, 30, log.clone()))
        .provider(delayed(1, 20, log.clone()))
        .provider(delayed(2, 10, log.clone()))
        .build(collect_u32);

    let result = f
        .injector()
        .call(&injected, None, vec![Value::new(3u32), Value::new(4u32)])
        .await
        .unwrap();

    assert_eq!(numbers(&result), vec![0, 1, 2, 3, 4]);
    assert_eq!(*log.lock().unwrap(), vec![2, 1, 0]);
}

#[tokio::test(start_paused = true)]
async fn test_providers_run_concurrently() {
    let f = fixture();
    let log = Arc::new(Mutex::new(Vec::new()));
    let injected = InjectedFn::builder()
        .provider(delayed(0, 50, log.clone()))
        .provider(delayed(1, 50, log.clone()))
        .build(collect_u32);
    let started = tokio::time::Instant::now();

    f.injector().call(&injected, None, vec![]).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_holes_are_skipped() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .provider(provide_value(Value::new(1u32)))
        .hole()
        .providers([None, Some(provide_value(Value::new(2u32)))])
        .build(collect_u32);

    let result = f.injector().call(&injected, None, vec![]).await.unwrap();

    assert_eq!(numbers(&result), vec![1, 2]);
}

#[tokio::test]
async fn test_wrong_receiver_fails_before_any_provider_runs() {
    let f = fixture();
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = calls.clone();
        provider(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Value::new(0u32)) }
        })
    };
    let injected = InjectedFn::builder()
        .receiver::<Counter>()
        .provider(counted)
        .build(collect_u32);

    let err = match f
        .injector()
        .invoke(&injected, Some(Value::new("not a counter")), vec![])
    {
        Err(err) => err,
        Ok(_) => panic!("mismatched receiver was accepted"),
    };

    assert!(matches!(err.root(), Error::WrongReceiverType { .. }));
    assert!(err.decl_site().is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_matching_receiver_is_passed_through() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .receiver::<Counter>()
        .build(|receiver, _args| async move {
            let count = receiver
                .and_then(|r| r.downcast_ref::<Counter>().map(|c| c.count))
                .unwrap_or_default();
            Ok(Value::new(count))
        });

    let result = f
        .injector()
        .call(&injected, Some(Value::new(Counter { count: 9 })), vec![])
        .await
        .unwrap();

    assert_eq!(result.downcast_ref::<u32>(), Some(&9));
}

#[tokio::test]
async fn test_missing_receiver_is_resolved_as_component() {
    let f = fixture();
    f.locator
        .insert_component("counter:c1", Value::new(Counter { count: 5 }));
    let injected = InjectedFn::builder()
        .receiver::<Counter>()
        .provider(provide_value(Value::new(1u32)))
        .build(|receiver, args| async move {
            let count = receiver
                .and_then(|r| r.downcast_ref::<Counter>().map(|c| c.count))
                .unwrap_or_default();
            let step = args[0].downcast_ref::<u32>().copied().unwrap_or_default();
            Ok(Value::new(count + step))
        });

    let result = f.injector().call(&injected, None, vec![]).await.unwrap();

    assert_eq!(result.downcast_ref::<u32>(), Some(&6));
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_carries_declaration_site() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .provider(failing("first", 20))
        .provider(failing("second", 0))
        .build(collect_u32);

    let err = f.injector().call(&injected, None, vec![]).await.unwrap_err();

    let site = err.decl_site().copied().unwrap();
    assert!(site.file.ends_with("injector_tests.rs"));
    assert!(err.to_string().contains(&format!("\nDECLARED {site}")));
    assert!(matches!(err.root(), Error::Service { message, .. } if message == "second"));
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_does_not_wait_for_hung_sibling() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .provider(failing("boom", 1))
        .provider(provider(|_| futures::future::pending::<Result<Value>>()))
        .build(collect_u32);

    let outcome = tokio::time::timeout(
        Duration::from_secs(60),
        f.injector().call(&injected, None, vec![]),
    )
    .await
    .expect("call still pending after a provider failed");

    let err = outcome.unwrap_err();
    assert!(matches!(err.root(), Error::Service { message, .. } if message == "boom"));
    assert!(err.decl_site().is_some());
}

#[tokio::test]
async fn test_resolved_component_of_wrong_type_is_rejected() {
    let f = fixture();
    f.locator
        .insert_component("counter:c1", Value::new("not a counter"));
    let ran = Arc::new(AtomicUsize::new(0));
    let injected = {
        let ran = ran.clone();
        InjectedFn::builder()
            .receiver::<Counter>()
            .build(move |_, _| {
                ran.fetch_add(1, Ordering::SeqCst);
                async { Ok(Value::new(())) }
            })
    };

    let err = f.injector().call(&injected, None, vec![]).await.unwrap_err();

    assert!(matches!(err.root(), Error::WrongReceiverType { .. }));
    assert!(err.decl_site().is_some());
    assert_eq!(ran.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_callable_failure_carries_declaration_site() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .build(|_, _| async { Err(Error::internal("handler blew up")) });

    let err = f.injector().call(&injected, None, vec![]).await.unwrap_err();

    assert!(matches!(err, Error::Declared { .. }));
    assert!(err.to_string().starts_with("Internal error: handler blew up\nDECLARED "));
}

#[tokio::test]
async fn test_without_decl_site_leaves_errors_undecorated() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .provider(failing("plain", 0))
        .without_decl_site()
        .build(collect_u32);

    let err = f.injector().call(&injected, None, vec![]).await.unwrap_err();

    assert!(matches!(err, Error::Service { .. }));
}

#[tokio::test]
async fn test_closest_and_parent_injectors() {
    let f = fixture();

    let injector = f.injector();
    assert_eq!(injector.element().attribute("user-id").as_deref(), Some("u1"));

    let own = f.context.injector_for(f.section.as_node()).unwrap();
    assert_eq!(own.element().attribute("user-id").as_deref(), Some("u1"));

    let parent = injector.get_parent().unwrap();
    assert_eq!(parent.element().attribute("theme").as_deref(), Some("dark"));
    assert!(parent.get_parent().is_none());
    assert!(f.context.injector_for(f.root.as_node()).is_some());
}

#[tokio::test]
async fn test_element_props_derived_and_overridden() {
    let f = fixture();
    let injector = f.injector();

    let derived = injector.element_props();
    assert_eq!(derived, props(json!({"userId": "u1"})));

    injector.set_element_props(Some(props(json!({"userId": "u2", "tab": "home"}))));
    assert_eq!(injector.element_props()["tab"], "home");

    injector.set_element_props(None);
    assert_eq!(injector.element_props(), derived);
}

#[tokio::test]
async fn test_parent_and_element_props_providers() {
    let f = fixture();
    let injected = InjectedFn::builder()
        .provider(provide_element_props())
        .provider(provide_parent(provide_element_props()))
        .build(|_, args| async move {
            let theme = |arg: &Value| {
                arg.downcast_ref::<KeyProps>()
                    .and_then(|props| props.get("theme").cloned())
            };
            Ok(Value::new((theme(&args[0]), theme(&args[1]))))
        });

    let result = f.injector().call(&injected, None, vec![]).await.unwrap();

    let (own, parent) = result
        .downcast_ref::<(Option<serde_json::Value>, Option<serde_json::Value>)>()
        .cloned()
        .unwrap();
    assert_eq!(own, None);
    assert_eq!(parent, Some(json!("dark")));
}

#[tokio::test]
async fn test_parent_provider_fails_at_top() {
    let f = fixture();
    let injector = f.injector().get_parent().unwrap();
    let injected = InjectedFn::builder()
        .provider(provide_parent(provide_element_props()))
        .build(collect_u32);

    let err = injector.call(&injected, None, vec![]).await.unwrap_err();

    assert!(matches!(err.root(), Error::Service { .. }));
}

#[tokio::test]
async fn test_symbol_and_service_providers() {
    let f = fixture();
    f.locator
        .insert_service("todos:main", Value::new("todo-service"), Some(Value::new(3u32)));
    let injected = InjectedFn::builder()
        .provider(provide_symbol("./widget#render"))
        .provider(provide_service("todos:main"))
        .provider(provide_service_state("todos:main"))
        .build(|_, args| async move {
            let text = |arg: &Value| arg.downcast_ref::<&str>().copied().unwrap_or_default();
            let state = args[2].downcast_ref::<u32>().copied().unwrap_or_default();
            Ok(Value::new(format!("{} {} {state}", text(&args[0]), text(&args[1]))))
        });

    let result = f.injector().call(&injected, None, vec![]).await.unwrap();

    assert_eq!(
        result.downcast_ref::<String>().map(String::as_str),
        Some("render-fn todo-service 3")
    );
}

#[tokio::test]
async fn test_component_provider() {
    let f = fixture();
    f.locator
        .insert_component("counter:c1", Value::new(Counter { count: 2 }));
    let injected = InjectedFn::builder()
        .provider(provide_component::<Counter>())
        .build(|_, args| async move {
            let count = args[0].downcast_ref::<Counter>().map(|c| c.count);
            Ok(Value::new(count.unwrap_or_default()))
        });

    let result = f.injector().call(&injected, None, vec![]).await.unwrap();

    assert_eq!(result.downcast_ref::<u32>(), Some(&2));
}

fn props(value: serde_json::Value) -> KeyProps {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
