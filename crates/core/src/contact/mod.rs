mod requests;
mod responses;
mod types;
pub mod validation;

pub use requests::{
    AddContactRequest, CreateUserRequest, DeleteUserRequest, ListUsersQuery, ReplaceContactRequest,
};
pub use responses::{
    ContactInfoResponse, ContactListsResponse, CreatedUserResponse, EmailResponse,
    PhoneNumberResponse, UserListItem,
};
pub use types::{ContactSet, Email, NewContact, NewUser, PhoneNumber, User};
pub use validation::{is_valid_email, ValidationErrors};
