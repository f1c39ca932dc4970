use swatch_strip::{layout, LayoutConfig, Palette, ReferenceArea};

fn main() {
    let path = std::env::args().nth(1).expect("usage: swatch-strip <image>");

    let palette = Palette::from_path(path).unwrap().extract();

    let config = LayoutConfig::default();
    let area = ReferenceArea::Page { width: 210.0, height: 297.0 };
    let swatches = layout(palette.colors(), &config, &area).unwrap();

    println!("{:#?}", swatches);
}
