//! OpenTelemetry span export and the traced invocation wrapper

use crate::chat::{ChatCompletion, ChatRequest};
use crate::error::{Error, Result};
use crate::llm_client::LlmClient;
use opentelemetry::global::{self, BoxedTracer};
use opentelemetry::trace::{Span, SpanKind, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{runtime, Resource};
use tracing::warn;

/// Handle to the installed trace pipeline. Spans buffered by the batch
/// processor are flushed on [`Telemetry::shutdown`].
#[derive(Debug)]
pub struct Telemetry {
    provider: TracerProvider,
}

impl Telemetry {
    /// Build the OTLP/gRPC trace pipeline and install it globally.
    ///
    /// `OTEL_EXPORTER_OTLP_ENDPOINT` must be set; its absence is fatal before
    /// any model call is attempted, so a misconfigured collector never goes
    /// unnoticed.
    pub fn init(service_name: &str) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .map_err(|_| Error::config("OTEL_EXPORTER_OTLP_ENDPOINT must be set in .env file"))?;

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| Error::tracing(e.to_string()))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                service_name.to_string(),
            )]))
            .build();
        global::set_tracer_provider(provider.clone());

        Ok(Self { provider })
    }

    /// Get a tracer from the installed provider
    pub fn tracer(&self, name: &'static str) -> BoxedTracer {
        global::tracer(name)
    }

    /// Flush pending spans and shut the pipeline down
    pub fn shutdown(&self) {
        if let Err(e) = self.provider.shutdown() {
            warn!("trace pipeline shutdown failed: {e}");
        }
    }
}

/// OTel attribute values are `i64`; token counts arrive as `u64`. Saturate
/// rather than wrap for counts beyond `i64::MAX`.
fn count_attribute(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Send one chat request wrapped in a span pair.
///
/// The outer `chat_with_model` span carries the prompt, model, and endpoint;
/// the inner `<client_type>.invoke` span times the remote call itself. On
/// success the inner span records the response length and the outer span the
/// token counts when the backend reports them. On failure both spans are
/// marked as errors and the error is returned unchanged. Both spans end on
/// every path.
pub async fn traced_complete(
    tracer: &BoxedTracer,
    client: &dyn LlmClient,
    request: ChatRequest,
) -> Result<ChatCompletion> {
    let mut span = tracer
        .span_builder("chat_with_model")
        .with_kind(SpanKind::Client)
        .start(tracer);
    span.set_attribute(KeyValue::new(
        "prompt.text",
        request.prompt().unwrap_or_default().to_string(),
    ));
    span.set_attribute(KeyValue::new("model.name", request.model.clone()));
    span.set_attribute(KeyValue::new("base.url", client.endpoint().to_string()));
    let cx = Context::current_with_span(span);

    let mut invoke_span =
        tracer.start_with_context(format!("{}.invoke", client.client_type()), &cx);
    let result = client.complete(request).await;
    match &result {
        Ok(completion) => {
            invoke_span.set_attribute(KeyValue::new(
                "response.length",
                count_attribute(completion.text.len() as u64),
            ));
            if let Some(usage) = &completion.usage {
                let outer = cx.span();
                outer.set_attribute(KeyValue::new(
                    "llm.total_tokens",
                    count_attribute(usage.total_tokens),
                ));
                outer.set_attribute(KeyValue::new(
                    "llm.prompt_tokens",
                    count_attribute(usage.prompt_tokens),
                ));
                outer.set_attribute(KeyValue::new(
                    "llm.completion_tokens",
                    count_attribute(usage.completion_tokens),
                ));
            }
        }
        Err(e) => {
            invoke_span.set_status(Status::error(e.to_string()));
            cx.span().set_status(Status::error(e.to_string()));
        }
    }
    invoke_span.end();
    cx.span().end();

    result
}
