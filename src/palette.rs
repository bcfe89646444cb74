use iced::Color;

pub const UNKNOWN: u32 = 0x888888;

/// Badge color of a Pokémon type, as `0xRRGGBB`.
pub fn type_hex(name: &str) -> u32 {
    match name {
        "normal" => 0xA8A878,
        "fire" => 0xF08030,
        "water" => 0x6890F0,
        "electric" => 0xF8D030,
        "grass" => 0x78C850,
        "ice" => 0x98D8D8,
        "fighting" => 0xC03028,
        "poison" => 0xA040A0,
        "ground" => 0xE0C068,
        "flying" => 0xA890F0,
        "psychic" => 0xF85888,
        "bug" => 0xA8B820,
        "rock" => 0xB8A038,
        "ghost" => 0x705898,
        "dragon" => 0x7038F8,
        "dark" => 0x705848,
        "steel" => 0xB8B8D0,
        "fairy" => 0xEE99AC,
        _ => UNKNOWN,
    }
}

pub fn type_color(name: &str) -> Color {
    let hex = type_hex(name);

    Color::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: [&str; 18] = [
        "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
        "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
    ];

    #[test]
    fn known_types_have_their_own_color() {
        for name in TYPES {
            assert_ne!(type_hex(name), UNKNOWN, "{name} has no color");
        }

        assert_eq!(type_hex("fire"), 0xF08030);
        assert_eq!(type_hex("fairy"), 0xEE99AC);
    }

    #[test]
    fn unknown_types_are_neutral() {
        assert_eq!(type_hex("shadow"), UNKNOWN);
        assert_eq!(type_hex("unknown"), UNKNOWN);
        assert_eq!(type_hex("Fire"), UNKNOWN);
        assert_eq!(type_color("stellar"), Color::from_rgb8(0x88, 0x88, 0x88));
    }

    #[test]
    fn converts_hex_channels() {
        assert_eq!(type_color("water"), Color::from_rgb8(0x68, 0x90, 0xF0));
    }
}
