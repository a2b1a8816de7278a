mod meta;
pub use self::meta::{ActionResult, BulkDeleteRequest, ListResult, Pagination};

mod entity;
pub use self::entity::{Entity, EntityId, NamedRef};

mod progress;
pub use self::progress::ProgressEvent;

mod inventory;
pub use self::inventory::{
    Brand, BrandInput, Car, CarInput, CarModel, CarModelInput, Feature, FeatureInput,
    Specification, SpecificationInput, Trim, TrimInput, Year, YearInput,
};

mod content;
pub use self::content::{
    Banner, BannerInput, BlogCategory, BlogCategoryInput, BlogPost, BlogPostInput, BlogTag,
    BlogTagInput, Page, PageInput, Section, SectionInput,
};

mod operations;
pub use self::operations::{
    ContactEnquiry, ContactEnquiryInput, NewsletterSubscription, NewsletterSubscriptionInput,
    Permission, PermissionInput, Role, RoleInput, User, UserInput,
};

mod file;
pub use self::file::FileEntry;
