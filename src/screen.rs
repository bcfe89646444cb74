pub mod about;
pub mod pokedex;

pub use pokedex::Pokedex;

pub enum Screen {
    Pokedex(Pokedex),
    About,
}
