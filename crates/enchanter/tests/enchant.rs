use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use enchanter::{
    AdapterCall, Credentials, EnchantError, EnchantRequest, EnchantResponse, Enchanter, Mode,
    OutputContract, ProviderAdapter, ProviderId, ProviderTable, Result, Settings,
};

/// Records each call and answers with whatever `reply` produces.
struct StubAdapter {
    provider: ProviderId,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String, String)>>,
    reply: fn(&AdapterCall<'_>) -> Result<EnchantResponse>,
}

impl StubAdapter {
    fn new(provider: ProviderId, reply: fn(&AdapterCall<'_>) -> Result<EnchantResponse>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProviderAdapter for StubAdapter {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    fn contract(&self) -> OutputContract {
        OutputContract::JsonMode
    }

    fn call<'a>(
        &'a self,
        call: AdapterCall<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<EnchantResponse>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((
            call.model_id.to_owned(),
            call.system_instruction.to_owned(),
            call.credential.unwrap_or_default().to_owned(),
        ));
        let reply = (self.reply)(&call);
        Box::pin(async move { reply })
    }
}

fn fixed(_: &AdapterCall<'_>) -> Result<EnchantResponse> {
    Ok(EnchantResponse {
        enhanced_prompt: "X".into(),
        explanation: "Y".into(),
        suggested_tags: vec!["z".into()],
    })
}

fn echo(call: &AdapterCall<'_>) -> Result<EnchantResponse> {
    Ok(EnchantResponse {
        enhanced_prompt: format!("enhanced: {}", call.input_text),
        explanation: String::new(),
        suggested_tags: Vec::new(),
    })
}

fn rate_limited(_: &AdapterCall<'_>) -> Result<EnchantResponse> {
    Err(EnchantError::Http {
        provider: ProviderId::OpenAi,
        status: 429,
        message: "rate limited".into(),
    })
}

fn enchanter_with(adapters: &[Arc<StubAdapter>]) -> Enchanter {
    let mut table = ProviderTable::new();
    for adapter in adapters {
        table.insert(adapter.clone());
    }
    Enchanter::new(table)
}

#[tokio::test]
async fn blank_input_is_rejected_before_dispatch() {
    let adapter = StubAdapter::new(ProviderId::Google, fixed);
    let enchanter = enchanter_with(&[adapter.clone()]);

    for input in ["", "   \n\t "] {
        let request = EnchantRequest::new(input, Mode::General, "gemini-2.5-flash")
            .with_credential(ProviderId::Google, "g-key");
        let err = enchanter.enchant(&request).await.unwrap_err();
        assert!(matches!(err, EnchantError::EmptyInput));
    }

    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn unknown_model_is_rejected_before_dispatch() {
    let adapter = StubAdapter::new(ProviderId::Google, fixed);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let request = EnchantRequest::new("hi", Mode::General, "nonexistent-model")
        .with_credential(ProviderId::Google, "g-key");
    let err = enchanter.enchant(&request).await.unwrap_err();

    assert!(matches!(err, EnchantError::UnknownModel { ref model_id } if model_id == "nonexistent-model"));
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn missing_credential_names_the_model() {
    let adapter = StubAdapter::new(ProviderId::Groq, fixed);
    let enchanter = enchanter_with(&[adapter.clone()]);

    // a key for another provider does not help
    let request = EnchantRequest::new("hi", Mode::General, "llama-3.3-70b-versatile")
        .with_credential(ProviderId::OpenAi, "sk-openai");
    let err = enchanter.enchant(&request).await.unwrap_err();

    assert!(err.needs_credentials());
    assert!(err.to_string().contains("Llama 3.3 (Free via Groq)"));
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn blank_credential_counts_as_missing() {
    let adapter = StubAdapter::new(ProviderId::OpenAi, fixed);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let request = EnchantRequest::new("hi", Mode::General, "gpt-5")
        .with_credential(ProviderId::OpenAi, "   ");
    let err = enchanter.enchant(&request).await.unwrap_err();

    assert!(matches!(
        err,
        EnchantError::MissingCredential { provider: ProviderId::OpenAi, model_name: Some(ref name) } if name == "GPT-5"
    ));
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn dispatches_to_the_owning_provider() {
    let google = StubAdapter::new(ProviderId::Google, echo);
    let openai = StubAdapter::new(ProviderId::OpenAi, fixed);
    let enchanter = enchanter_with(&[google.clone(), openai.clone()]);

    let credentials = Credentials::new()
        .with(ProviderId::Google, "g-key")
        .with(ProviderId::OpenAi, "sk-openai");
    let request = EnchantRequest::new("hi", Mode::General, "gpt-5").with_credentials(credentials);

    let response = enchanter.enchant(&request).await.unwrap();

    assert_eq!(
        response,
        EnchantResponse {
            enhanced_prompt: "X".into(),
            explanation: "Y".into(),
            suggested_tags: vec!["z".into()],
        }
    );
    assert_eq!(openai.calls(), 1);
    assert_eq!(google.calls(), 0);

    let seen = openai.seen.lock().unwrap();
    let (model, instruction, credential) = &seen[0];
    assert_eq!(model, "gpt-5");
    assert_eq!(credential, "sk-openai");
    assert_eq!(instruction, &enchanter::prompt::instruction_for(Mode::General));
}

#[tokio::test]
async fn mode_selects_the_instruction() {
    let adapter = StubAdapter::new(ProviderId::Google, fixed);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let request = EnchantRequest::new("sort a list", Mode::Coding, "gemini-2.5-flash")
        .with_credential(ProviderId::Google, "g-key");
    enchanter.enchant(&request).await.unwrap();

    let seen = adapter.seen.lock().unwrap();
    assert_eq!(seen[0].1, enchanter::prompt::instruction_for(Mode::Coding));
    assert_ne!(seen[0].1, enchanter::prompt::instruction_for(Mode::Image));
}

#[tokio::test]
async fn adapter_errors_pass_through() {
    let adapter = StubAdapter::new(ProviderId::OpenAi, rate_limited);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let request =
        EnchantRequest::new("hi", Mode::General, "gpt-5").with_credential(ProviderId::OpenAi, "sk");
    let err = enchanter.enchant(&request).await.unwrap_err();

    assert!(matches!(
        err,
        EnchantError::Http { provider: ProviderId::OpenAi, status: 429, ref message } if message == "rate limited"
    ));
    assert_eq!(err.to_string(), "OpenAI error (429): rate limited");
}

#[tokio::test]
async fn unregistered_provider_is_reported() {
    let enchanter = enchanter_with(&[StubAdapter::new(ProviderId::Google, fixed)]);

    let request = EnchantRequest::new("hi", Mode::Writing, "claude-sonnet-4-5")
        .with_credential(ProviderId::Anthropic, "sk-ant");
    let err = enchanter.enchant(&request).await.unwrap_err();

    assert!(matches!(
        err,
        EnchantError::ProviderNotConfigured { provider: ProviderId::Anthropic }
    ));
}

#[tokio::test]
async fn settings_drive_the_request() {
    let adapter = StubAdapter::new(ProviderId::Groq, echo);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let settings = Settings::from_lookup(|name| match name {
        "ENCHANTER_MODEL" => Some("llama-3.3-70b-versatile".into()),
        "GROQ_API_KEY" => Some("gsk".into()),
        _ => None,
    });

    let response = enchanter
        .enchant_with_settings("hello", Mode::Social, &settings)
        .await
        .unwrap();

    assert_eq!(response.enhanced_prompt, "enhanced: hello");
    assert_eq!(adapter.seen.lock().unwrap()[0].2, "gsk");
}

#[tokio::test]
async fn record_carries_request_metadata() {
    let adapter = StubAdapter::new(ProviderId::Anthropic, fixed);
    let enchanter = enchanter_with(&[adapter]);

    let request = EnchantRequest::new("write an email", Mode::Writing, "claude-sonnet-4-5")
        .with_credential(ProviderId::Anthropic, "sk-ant");
    let record = enchanter.enchant_to_record(&request).await.unwrap();

    assert_eq!(record.original, "write an email");
    assert_eq!(record.enhanced, "X");
    assert_eq!(record.tags, vec!["z".to_owned()]);
    assert_eq!(record.mode, Mode::Writing);
    assert_eq!(record.model_used, "Claude Sonnet 4.5");
}

#[tokio::test]
async fn concurrent_calls_do_not_cross() {
    let adapter = StubAdapter::new(ProviderId::Google, echo);
    let enchanter = enchanter_with(&[adapter.clone()]);

    let requests: Vec<_> = (0..32)
        .map(|i| {
            EnchantRequest::new(format!("idea {i}"), Mode::General, "gemini-2.5-flash")
                .with_credential(ProviderId::Google, "g-key")
        })
        .collect();

    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let enchanter = enchanter.clone();
            tokio::spawn(async move { enchanter.enchant(&request).await })
        })
        .collect();

    let results = futures_util::future::join_all(handles).await;

    for (i, result) in results.into_iter().enumerate() {
        let response = result.unwrap().unwrap();
        assert_eq!(response.enhanced_prompt, format!("enhanced: idea {i}"));
    }
    assert_eq!(adapter.calls(), 32);
}
