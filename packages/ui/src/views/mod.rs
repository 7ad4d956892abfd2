mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod recipe_detail;
pub use recipe_detail::RecipeDetailView;

mod profile;
pub use profile::UserProfileView;

mod home;
pub use home::HomeView;

mod notebook;
pub use notebook::NotebookView;
