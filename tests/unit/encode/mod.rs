use super::*;
use crate::style::canvas::BackgroundStyle;

#[test]
fn directives_per_platform() {
    assert_eq!(
        FilterDirective::for_platform(Platform::YouTube).filter_chain(),
        "scale=1920:1080:force_original_aspect_ratio=decrease,pad=1920:1080:(ow-iw)/2:(oh-ih)/2:color=black"
    );
    assert_eq!(
        FilterDirective::for_platform(Platform::TikTok).filter_complex(),
        "[0:v]scale=1080:1920:force_original_aspect_ratio=decrease,pad=1080:1920:(ow-iw)/2:(oh-ih)/2:color=black[v]"
    );
    let square = FilterDirective::for_platform(Platform::Square);
    assert_eq!((square.width, square.height), (1080, 1080));
}

#[test]
fn canvas_and_platform_agree() {
    for p in Platform::ALL {
        let canvas = CanvasSpec::new(p, BackgroundStyle::PlainBlack);
        assert_eq!(FilterDirective::for_canvas(&canvas), FilterDirective::for_platform(p));
    }
}
