mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod feed;
pub use feed::Feed;

mod notebook;
pub use notebook::Notebook;
