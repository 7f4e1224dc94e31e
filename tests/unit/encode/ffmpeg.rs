use std::ffi::OsStr;

use super::*;
use crate::encode::FilterDirective;
use crate::style::canvas::Platform;

#[test]
fn probe_duration_parses_ffprobe_json() {
    let json = br#"{ "format": { "duration": "183.416000" } }"#;
    assert!((parse_probe_duration(json).unwrap() - 183.416).abs() < 1e-9);
}

#[test]
fn probe_duration_errors_are_encoder_failures() {
    for bad in [
        &b"not json"[..],
        &br#"{ "format": {} }"#[..],
        &br#"{ "format": { "duration": "N/A" } }"#[..],
        &br#"{ "format": { "duration": "0.0" } }"#[..],
    ] {
        assert_eq!(parse_probe_duration(bad).unwrap_err().kind(), "encoder_failure");
    }
}

#[test]
fn render_args_loop_frame_over_audio() {
    let job = EncodeJob {
        frame_path: Path::new("temp/frame.png"),
        audio_path: Path::new("in/track.mp3"),
        output_path: Path::new("output/video.mp4"),
        filter: FilterDirective::for_platform(Platform::YouTube),
        duration_sec: 12.5,
    };
    let args = render_args(&job);
    let args: Vec<&OsStr> = args.iter().map(|a| a.as_os_str()).collect();
    let expected: Vec<&OsStr> = [
        "-loop",
        "1",
        "-i",
        "temp/frame.png",
        "-i",
        "in/track.mp3",
        "-filter_complex",
        "[0:v]scale=1920:1080:force_original_aspect_ratio=decrease,pad=1920:1080:(ow-iw)/2:(oh-ih)/2:color=black[v]",
        "-map",
        "[v]",
        "-map",
        "1:a",
        "-t",
        "12.5",
        "-c:v",
        "libx264",
        "-c:a",
        "aac",
        "-pix_fmt",
        "yuv420p",
        "-shortest",
        "-y",
        "output/video.mp4",
    ]
    .into_iter()
    .map(OsStr::new)
    .collect();
    assert_eq!(args, expected);
}

#[test]
fn probe_args_request_json_duration() {
    let args = probe_args(Path::new("a.wav"));
    assert_eq!(args.len(), 7);
    assert_eq!(args[3], OsString::from("format=duration"));
    assert_eq!(args[6], OsString::from("a.wav"));
}

#[test]
fn missing_binary_is_reported_not_panicking() {
    let enc = FfmpegEncoder::new("target/definitely-not-ffmpeg", "target/definitely-not-ffprobe");
    assert!(!enc.is_available());
    let err = enc.probe_duration(Path::new("a.wav")).unwrap_err();
    assert_eq!(err.kind(), "encoder_failure");
}

#[test]
fn config_names_the_binaries() {
    let cfg = EngineConfig {
        ffmpeg_bin: PathBuf::from("/opt/ff/ffmpeg"),
        ..EngineConfig::default()
    };
    let enc = FfmpegEncoder::from_config(&cfg);
    assert_eq!(enc, FfmpegEncoder::new("/opt/ff/ffmpeg", "ffprobe"));
}
