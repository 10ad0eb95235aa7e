use moonphase::adapters::raster::encode_png;
use moonphase::core::phase::REFERENCE_NEW_MOON;
use moonphase::domain::colour::Colour;
use moonphase::utils::validation::Validate;
use moonphase::{
    DrawOptions, FixedClock, LocalStorage, MoonEngine, MoonToml, OutputFormat, PhaseName,
    RasterRenderer, SvgRenderer,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_svg_end_to_end_from_toml() {
    let mut config_file = NamedTempFile::new().unwrap();
    config_file
        .write_all(
            br##"
[disc]
light_color = "#fafafa"
diameter = 200
blur = 10
earthshine = 0.1

[output]
format = "svg"
"##,
        )
        .unwrap();

    let file_config = MoonToml::from_file(config_file.path()).unwrap();
    assert!(file_config.validate().is_ok());
    assert_eq!(file_config.format(), OutputFormat::Svg);

    let clock = FixedClock::new(REFERENCE_NEW_MOON.offset_by(7 * 86_400));
    let engine = MoonEngine::new(clock, file_config.disc.apply_defaults());
    let rendering = engine.run(&mut SvgRenderer::new()).unwrap();

    assert_eq!(rendering.phase.name, PhaseName::FirstQuarter);
    assert!(rendering.output.contains("width=\"200\""));
    assert!(rendering.output.contains("stdDeviation=\"5\""));
    assert!(rendering.output.contains("opacity=\"0.9\""));
    assert!(rendering.output.contains("#fafafa"));
}

#[test]
fn test_png_written_to_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());

    let config = DrawOptions {
        diameter: Some(48.0),
        blur: Some(6.0),
        ..Default::default()
    }
    .apply_defaults();
    let engine = MoonEngine::new(
        FixedClock::new(REFERENCE_NEW_MOON.offset_by(20 * 86_400)),
        config,
    );

    let mut renderer = RasterRenderer::with_background(Colour::WHITE);
    let rendering = engine.run(&mut renderer).unwrap();
    assert_eq!(rendering.phase.name, PhaseName::WaningGibbous);
    assert_eq!(rendering.output.dimensions(), (48, 48));

    let written = storage
        .write_file("out/moon.png", &encode_png(&rendering.output).unwrap())
        .unwrap();
    assert!(written.exists());

    let decoded = image::open(&written).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (48, 48));
    // Waning gibbous: the left side is lit, the right side multiplies to grey.
    let left = decoded.get_pixel(12, 24).0;
    let right = decoded.get_pixel(44, 24).0;
    assert_eq!(left, [255, 255, 255, 255]);
    assert_eq!(right, [51, 51, 51, 255]);
}

#[test]
fn test_cli_values_override_file_values() {
    let file_config = MoonToml::from_toml_str(
        r#"
[disc]
diameter = 300
earthshine = 0.2
"#,
    )
    .unwrap();
    let overrides = DrawOptions {
        diameter: Some(120.0),
        ..Default::default()
    };

    let config = file_config.disc.merged_with(&overrides).apply_defaults();
    assert_eq!(config.diameter, 120.0);
    assert_eq!(config.earthshine, 0.2);
    assert_eq!(config.blur, 40.0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let engine = MoonEngine::new(
        FixedClock::new(REFERENCE_NEW_MOON.offset_by(3 * 86_400)),
        DrawOptions::default().apply_defaults(),
    );
    let first = engine.run(&mut SvgRenderer::new()).unwrap();
    let second = engine.run(&mut SvgRenderer::new()).unwrap();

    assert_eq!(first.output, second.output);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
