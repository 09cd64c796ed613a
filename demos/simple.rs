use scene_doc::{Color, Reader, Vector3, Writer};

fn main() {
    let mut writer = Writer::new();
    writer.write("name", "Demo Scene");
    writer.write_object("player", "Entity");
    writer.write("health", 100);
    writer.write("position", Vector3::new(1.0, 0.0, -2.5));
    writer.write("tint", Color::rgb(0.9, 0.8, 0.7));
    writer.end_object();

    let json = writer.to_json();
    println!("Written document:\n{json}");

    let mut reader = Reader::new();
    if let Err(e) = reader.load_from_string(&json) {
        eprintln!("Failed to load document: {:?}", miette::Report::new(e));
        return;
    }

    let mut health = 0;
    let mut position = Vector3::default();
    reader.read("player.health", &mut health);
    reader.read("player.position", &mut position);
    println!("player health = {health}, position = {position:?}");

    match reader.to_yaml() {
        Ok(yaml) => println!("As YAML:\n{yaml}"),
        Err(e) => eprintln!("Failed to export YAML: {e}"),
    }
}
