use std::{fs, io};
use choropleth::{Choropleth, Config, DrawCommand, Error, FileSource,
                 Source, fetch, render_to};
use choropleth::config::PaletteConfig;
use choropleth::surface::Tick;
use rgb::RGB8;

// Three unit squares: A and B share the edge x = 1, C stands apart.
// A belongs to one state, B and C to another.
const TOPOLOGY: &str = r#"{
  "type": "Topology",
  "objects": {
    "counties": {"type": "GeometryCollection", "geometries": [
      {"type": "Polygon", "id": 1001, "arcs": [[0, 1]]},
      {"type": "Polygon", "id": "01003", "arcs": [[2, -1]]},
      {"type": "Polygon", "id": 9999, "arcs": [[3]]}
    ]},
    "states": {"type": "GeometryCollection", "geometries": [
      {"type": "MultiPolygon", "id": "01", "arcs": [[[0, 1]]]},
      {"type": "MultiPolygon", "id": "02", "arcs": [[[2, -1]], [[3]]]}
    ]}
  },
  "arcs": [
    [[1, 0], [1, 1]],
    [[1, 1], [0, 1], [0, 0], [1, 0]],
    [[1, 0], [2, 0], [2, 1], [1, 1]],
    [[3, 0], [4, 0], [4, 1], [3, 0]]
  ]
}"#;

const EDUCATION: &str = r#"[
  {"fips": 1001, "state": "AL", "area_name": "A County", "bachelorsOrHigher": 10},
  {"fips": 1003, "state": "AL", "area_name": "B County", "bachelorsOrHigher": 30}
]"#;

const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };

struct Memory {
    location: &'static str,
    text: Option<&'static str>,
}

impl Source for Memory {
    fn location(&self) -> &str { self.location }

    fn fetch(&self) -> choropleth::Result<Vec<u8>> {
        match self.text {
            Some(t) => Ok(t.as_bytes().to_vec()),
            None => Err(Error::Fetch {
                location: self.location.into(),
                source: io::Error::new(io::ErrorKind::NotFound, "offline") }),
        }
    }
}

fn topology() -> Memory { Memory { location: "counties", text: Some(TOPOLOGY) } }
fn education() -> Memory { Memory { location: "education", text: Some(EDUCATION) } }
fn offline(location: &'static str) -> Memory { Memory { location, text: None } }

fn config() -> Config {
    Config {
        palette: PaletteConfig { colors: Some(vec!["#000".into(), "#fff".into()]),
                                 ..PaletteConfig::default() },
        ..Config::default()
    }
}

fn draw(config: &Config, t: &dyn Source, s: &dyn Source,
        surface: &mut Vec<DrawCommand>) -> choropleth::Result<()> {
    let (topo, obs) = fetch::load(t, s)?;
    Choropleth::new(config, &topo, &obs)?.render(surface)?;
    Ok(())
}

#[test]
fn draw_commands() {
    let config = config();
    let mut cmds = vec![];
    draw(&config, &topology(), &education(), &mut cmds).unwrap();

    // Two colors: the legend is 4 cells wide and 2.5 cells tall.
    assert_eq!(cmds[0], DrawCommand::BeginGroup {
        id: Some("legend".into()), class: None, offset: (600., 0.),
        size: Some((120., 50.)) });

    let rects: Vec<_> = cmds.iter().filter_map(|c| match c {
        DrawCommand::Rect { x, fill, .. } => Some((*x, *fill)),
        _ => None }).collect();
    assert_eq!(rects, vec![(25., BLACK), (55., WHITE)]);

    let ticks = cmds.iter().find_map(|c| match c {
        DrawCommand::Axis { ticks, range, tick_size, .. } => {
            assert_eq!(*range, (25., 85.));
            assert_eq!(*tick_size, -10.);
            Some(ticks.clone())
        }
        _ => None }).unwrap();
    assert_eq!(ticks, vec![Tick { at: 25., label: "10%".into() },
                           Tick { at: 55., label: "20%".into() },
                           Tick { at: 85., label: "30%".into() }]);

    let areas: Vec<_> = cmds.iter().filter_map(|c| match c {
        DrawCommand::Area { path, fill, data, tooltip, .. } =>
            Some((path.as_str(), *fill, data.clone(), tooltip.clone())),
        _ => None }).collect();
    assert_eq!(areas.len(), 3);
    assert_eq!(areas[0].0, "M1,0L1,1L0,1L0,0L1,0Z");
    assert_eq!(areas[0].1, BLACK);
    assert_eq!(areas[0].3.as_deref(), Some("A County, AL: 10%"));
    assert_eq!(areas[1].1, WHITE);
    assert_eq!(areas[1].2, vec![("data-fips".to_string(), "1003".to_string()),
                                ("data-education".to_string(), "30".to_string())]);
    // No observation for 9999: fallback color, no tooltip.
    assert_eq!(areas[2].1, BLACK);
    assert_eq!(areas[2].2[1].1, "0");
    assert_eq!(areas[2].3, None);

    assert_eq!(cmds.last(), Some(&DrawCommand::Stroke {
        path: "M1,0L1,1".into(), class: "stateBorder".into() }));
}

#[test]
fn groups_are_balanced() {
    let mut cmds = vec![];
    draw(&config(), &topology(), &education(), &mut cmds).unwrap();
    let mut depth = 0i32;
    for c in &cmds {
        match c {
            DrawCommand::BeginGroup { .. } => depth += 1,
            DrawCommand::EndGroup => depth -= 1,
            _ => (),
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
}

#[test]
fn failed_fetch_draws_nothing() {
    let config = config();
    for (t, s) in [(offline("counties"), education()),
                   (topology(), offline("education")),
                   (offline("counties"), offline("education"))] {
        let mut cmds = vec![];
        match draw(&config, &t, &s, &mut cmds) {
            Err(Error::Fetch { location, .. }) =>
                assert!(location == "counties" || location == "education"),
            r => panic!("unexpected {r:?}"),
        }
        assert!(cmds.is_empty(), "{cmds:?}");
    }
}

#[test]
fn failed_fetch_writes_nothing() {
    let mut opened = false;
    let r = render_to(&config(), &topology(), &offline("education"), || {
        opened = true;
        Ok(io::sink())
    });
    assert!(r.is_err());
    assert!(!opened);
}

#[test]
fn missing_object_draws_nothing() {
    let config = Config { borders_object: "nation".into(), ..config() };
    let mut cmds = vec![];
    let r = draw(&config, &topology(), &education(), &mut cmds);
    assert!(matches!(r, Err(Error::MissingObject(n)) if n == "nation"));
    assert!(cmds.is_empty());
}

#[test]
fn svg_document() {
    let mut buf = Vec::new();
    let out = &mut buf;
    let stats = render_to(&config(), &topology(), &education(),
                          move || Ok(out)).unwrap();
    assert_eq!((stats.regions, stats.matched), (3, 2));
    let svg = String::from_utf8(buf).unwrap();
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("<svg id=\"legend\" x=\"600\" y=\"0\" width=\"120\" \
                          height=\"50\">"), "{svg}");
    assert!(svg.contains("<g id=\"x-axis\" transform=\"translate(0,20)\">"), "{svg}");
    assert!(svg.contains("data-fips=\"1001\" data-education=\"10\" \
                          fill=\"#000000\""), "{svg}");
    assert!(svg.contains("<title>B County, AL: 30%</title>"), "{svg}");
    assert!(svg.contains("<path class=\"stateBorder\" d=\"M1,0L1,1\"/>"), "{svg}");
    assert!(svg.contains(">% adults &gt;= 25 with bachelor&#39;s degree</text>"),
            "{svg}");
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn run_with_files() {
    let dir = std::env::temp_dir()
        .join(format!("choropleth-test-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let topo = dir.join("counties.json");
    let stats = dir.join("education.json");
    let output = dir.join("map.svg");
    fs::write(&topo, TOPOLOGY).unwrap();
    fs::write(&stats, EDUCATION).unwrap();
    let config = Config {
        topology: topo.to_string_lossy().into_owned(),
        statistics: stats.to_string_lossy().into_owned(),
        output: Some(output.clone()),
        ..config()
    };
    assert_eq!(choropleth::run(&config).unwrap().matched, 2);
    assert!(fs::read_to_string(&output).unwrap().contains("class=\"county\""));

    let missing = Config { statistics: dir.join("absent.json")
                           .to_string_lossy().into_owned(),
                           output: Some(dir.join("never.svg")), ..config };
    assert!(matches!(choropleth::run(&missing), Err(Error::Fetch { .. })));
    assert!(!dir.join("never.svg").exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn url_locations_are_rejected() {
    assert!(matches!(FileSource::new("https://cdn.example.org/counties.json"),
                     Err(Error::UnsupportedLocation(_))));
}
