use crate::config::{ClientKind, Config};
use crate::leaf_shield::core::{Model, RequestToken, Screen};
use crate::leaf_shield::render::{format_confidence, view, Control, ResultRow, TITLE};
use crate::leaf_shield::tests::fixture::{healthy, leaf};

fn model(screen: Screen) -> Model {
    Model {
        requests_issued: 1,
        screen,
        ..Model::default()
    }
}

#[test]
fn test_format_confidence() {
    assert_eq!(format_confidence(0.8734), "87.34%");
    assert_eq!(format_confidence(0.5), "50.00%");
    assert_eq!(format_confidence(1.0), "100.00%");
    assert_eq!(format_confidence(0.0), "0.00%");
}

#[test]
fn test_resolved_shows_label_and_percentage() {
    let v = view(
        &Config::default(),
        &model(Screen::Resolved {
            image: leaf("a.jpg"),
            result: healthy(),
        }),
    );

    assert_eq!(
        v.result,
        Some(ResultRow {
            label: "Healthy".to_string(),
            confidence: "87.34%".to_string(),
        })
    );
    assert!(!v.loading);
    assert_eq!(v.image, Some(leaf("a.jpg")));
    assert_eq!(v.controls, vec![Control::Reset]);
}

#[test]
fn test_idle_shows_prompt_only() {
    let v = view(&Config::default(), &Model::default());

    assert_eq!(v.title, TITLE);
    assert_eq!(
        v.prompt.as_deref(),
        Some("Drag and drop an image of plant leaf to process")
    );
    assert!(v.image.is_none());
    assert!(v.result.is_none());
    assert!(!v.loading);
    assert!(v.accepts_files);
    assert!(v.controls.is_empty());
}

#[test]
fn test_loading_indicator_only_on_web() {
    let predicting = model(Screen::Predicting {
        image: leaf("a.jpg"),
        request: RequestToken(1),
    });
    let mobile = Config {
        client: ClientKind::Mobile,
        ..Config::default()
    };

    let web_view = view(&Config::default(), &predicting);
    let mobile_view = view(&mobile, &predicting);

    assert!(web_view.loading);
    assert_eq!(web_view.image, Some(leaf("a.jpg")));
    assert!(web_view.result.is_none());
    assert!(!mobile_view.loading);
    assert!(!mobile_view.accepts_files);
}

#[test]
fn test_previewing_has_no_result_and_no_spinner() {
    let v = view(
        &Config::default(),
        &model(Screen::Previewing {
            image: leaf("a.jpg"),
        }),
    );

    assert!(v.result.is_none());
    assert!(!v.loading);
    assert_eq!(v.controls, vec![Control::Reset]);
}

#[test]
fn test_controls_per_client() {
    let mobile = Config {
        client: ClientKind::Mobile,
        predict_on_acquire: false,
        ..Config::default()
    };

    let idle = view(&mobile, &Model::default());
    let previewing = view(
        &mobile,
        &model(Screen::Previewing {
            image: leaf("image.jpeg"),
        }),
    );

    assert_eq!(idle.controls, vec![Control::Capture]);
    assert_eq!(
        idle.prompt.as_deref(),
        Some("Press capture to photograph a plant leaf")
    );
    assert_eq!(previewing.controls, vec![Control::Submit, Control::Reset]);
}
