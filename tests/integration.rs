use cat_avatar_generator::{
    ai::{ImageGenerationService, MinimaxImageClient, MockImageGenerationClient},
    compose_prompt,
    models::{AspectRatio, Config, ImageUrls, ResponseFormat},
    preferences::{Appearance, Color, Personality, Role},
    GenerationError, Preferences,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn minimax_client(server: &MockServer) -> MinimaxImageClient {
    MinimaxImageClient::new(&Config::new("test-key".to_string())).with_base_url(server.uri())
}

#[tokio::test]
async fn test_generate_then_download_with_mock_server() {
    let server = MockServer::start().await;
    let image_url = format!("{}/files/cat_0.jpeg", server.uri());
    let image_bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x42];

    Mock::given(method("POST"))
        .and(path("/v1/image_generation"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "task-xyz",
            "data": {"image_urls": [image_url]},
            "metadata": {"success_count": "1", "failed_count": "0"},
            "base_resp": {"status_code": 0, "status_msg": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/cat_0.jpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = minimax_client(&server);
    let prefs = Preferences::from_labels("薰衣草紫", "害羞", "戴围巾", "引导型老师");

    let result = client
        .generate_image(&prefs, AspectRatio::Square, 1, ResponseFormat::Url)
        .await
        .unwrap();

    assert_eq!(result.task_id, "task-xyz");
    assert_eq!(result.prompt, compose_prompt("lavender-purple", "shy", "scarf", "mentor"));
    assert_eq!(result.metadata["success_count"], "1");

    let url = match &result.image_url {
        ImageUrls::Single(url) => url.clone(),
        other => panic!("expected a single URL, got {:?}", other),
    };

    let dir = tempfile::tempdir().unwrap();
    let saved = client
        .download_image(&url, &dir.path().join("avatars/user-1/out.jpeg"))
        .await
        .unwrap();

    assert!(saved.is_absolute());
    assert!(saved.ends_with("avatars/user-1/out.jpeg"));
    assert_eq!(std::fs::read(&saved).unwrap(), image_bytes);

    client.close();
}

#[tokio::test]
async fn test_out_of_range_counts_never_reach_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = minimax_client(&server);
    let prefs = Preferences::default();

    for count in [0, 5] {
        assert!(matches!(
            client
                .generate_multiple_images(&prefs, count, AspectRatio::Square)
                .await,
            Err(GenerationError::InvalidCount(_))
        ));
        assert!(matches!(
            client
                .generate_image(&prefs, AspectRatio::Square, count, ResponseFormat::Url)
                .await,
            Err(GenerationError::InvalidCount(_))
        ));
    }
}

#[tokio::test]
async fn test_business_and_extraction_failures_are_distinguishable() {
    let business = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base_resp": {"status_code": 1002, "status_msg": "rate limited"}
        })))
        .mount(&business)
        .await;

    let extraction = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t",
            "data": {"status": "done"},
            "base_resp": {"status_code": 0, "status_msg": "success"}
        })))
        .mount(&extraction)
        .await;

    let prefs = Preferences::default();

    let business_err = minimax_client(&business)
        .generate_image(&prefs, AspectRatio::Square, 1, ResponseFormat::Url)
        .await
        .unwrap_err();
    let extraction_err = minimax_client(&extraction)
        .generate_image(&prefs, AspectRatio::Square, 1, ResponseFormat::Url)
        .await
        .unwrap_err();

    assert!(matches!(business_err, GenerationError::Business { .. }));
    assert!(business_err.to_string().contains("rate limited"));
    assert!(matches!(extraction_err, GenerationError::Extraction(_)));
    assert_ne!(business_err.to_string(), extraction_err.to_string());
}

#[tokio::test]
async fn test_multiple_images_preserve_remote_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task_id": "multi",
            "data": {"image_urls": ["z-last-alphabetically", "a-first-alphabetically"]},
            "base_resp": {"status_code": 0, "status_msg": "success"}
        })))
        .mount(&server)
        .await;

    let prefs = Preferences::new(Color::MintGreen, Personality::Lively, Appearance::Glasses, Role::CaringElder);
    let images = minimax_client(&server)
        .generate_multiple_images(&prefs, 2, AspectRatio::Portrait)
        .await
        .unwrap();

    let urls: Vec<&str> = images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(urls, vec!["z-last-alphabetically", "a-first-alphabetically"]);
    assert_eq!(images.iter().map(|i| i.index).collect::<Vec<_>>(), vec![0, 1]);
    assert!(images.iter().all(|i| i.task_id == "multi" && i.prompt == prefs.prompt()));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "shared",
            "data": {"image_urls": ["u1"]}
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = minimax_client(&server);
    let prefs = Preferences::default();

    let (a, b, c) = tokio::join!(
        client.generate_image(&prefs, AspectRatio::Square, 1, ResponseFormat::Url),
        client.generate_image(&prefs, AspectRatio::Landscape, 1, ResponseFormat::Url),
        client.generate_image(&prefs, AspectRatio::Tall, 1, ResponseFormat::Url),
    );

    for result in [a, b, c] {
        assert_eq!(result.unwrap().image_url, ImageUrls::Single("u1".to_string()));
    }
}

#[tokio::test]
async fn test_mock_service_through_trait_object() {
    let service: Box<dyn ImageGenerationService> = Box::new(
        MockImageGenerationClient::new()
            .with_urls(vec!["https://cdn.test/1.jpeg".to_string(), "https://cdn.test/2.jpeg".to_string()])
            .with_image_bytes(b"fake jpeg".to_vec()),
    );

    let images = service
        .generate_multiple_images(&Preferences::default(), 2, AspectRatio::Square)
        .await
        .unwrap();
    assert_eq!(images.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    for image in &images {
        let saved = service
            .download_image(&image.url, &dir.path().join(format!("{}.jpeg", image.index)))
            .await
            .unwrap();
        assert_eq!(std::fs::read(saved).unwrap(), b"fake jpeg");
    }
}
