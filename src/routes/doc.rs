use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        address::{AddressForm, DeliveryAddress},
        cart::{CartLineItem, SavedItem},
        catalog::{MenuItem, OptionGroup, OptionItem, Product, Shop},
        favorite::FavoriteItem,
        merchant_order::MerchantOrderStatus,
        order::{Order, OrderStatus, OrderType, TimelineStep},
        payment::{PaymentMethod, PaymentType},
        pricing::PriceBreakdown,
        profile::RegistrationForm,
        report::{SalesReport, Timeframe, TopItem},
        search::{PriceRange, ResultKind, SearchResult, SortOption, TypeFilter},
    },
    dto::{
        account::{AddressList, FavoriteList, PaymentMethodList, PaymentMethodView},
        auth::{AuthResponse, LoginRequest, OAuthProfile, OAuthTokenRequest, UpdateUserRequest},
        cart::{AddItemRequest, CartCount, CartView, QuantityChange, QuickAddRequest, SavedList},
        catalog::{ProductQuote, ProductQuoteRequest, SearchHistory, SearchResults, ShopDetail, ShopList},
        merchant::{
            CreateMerchantOrderRequest, CreateProductRequest, MerchantOrderList,
            MerchantOrderWithItems, MerchantRegistered, OrderLineRequest, ProductList,
            RegisterMerchantRequest, ReportList, UpdateOrderStatusRequest, UpdateProductRequest,
        },
        orders::{CheckoutRequest, OrderList, OrderTracking},
    },
    models::{Merchant, MerchantOrder, MerchantOrderItem, MerchantProduct, User},
    money::Money,
    response::{ApiResponse, Meta},
    routes::{account, auth, cart, catalog, health, merchant, orders},
    services::cart_service::CartEvent,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        auth::register,
        auth::login,
        auth::oauth_token,
        auth::sign_out,
        account::get_user,
        account::update_user,
        account::list_addresses,
        account::add_address,
        account::update_address,
        account::delete_address,
        account::set_default_address,
        account::list_payment_methods,
        account::set_default_payment_method,
        account::remove_payment_method,
        account::list_favorites,
        account::add_favorite,
        account::remove_favorite,
        account::favorite_to_cart,
        catalog::list_shops,
        catalog::get_shop,
        catalog::get_product,
        catalog::quote_product,
        catalog::search,
        catalog::search_history,
        catalog::clear_search_history,
        cart::cart_list,
        cart::cart_count,
        cart::cart_event_stream,
        cart::cart_quote,
        cart::add_item,
        cart::quick_add,
        cart::change_quantity,
        cart::remove_item,
        cart::clear_cart,
        cart::save_for_later,
        cart::saved_list,
        cart::move_to_cart,
        cart::delete_saved,
        orders::list_orders,
        orders::checkout,
        orders::get_order,
        orders::advance_order,
        orders::order_timeline,
        merchant::register_merchant,
        merchant::create_product,
        merchant::list_products,
        merchant::update_product,
        merchant::create_order,
        merchant::list_orders,
        merchant::update_order_status,
        merchant::cancel_order,
        merchant::sales_reports
    ),
    components(
        schemas(
            Money,
            Shop,
            MenuItem,
            Product,
            OptionGroup,
            OptionItem,
            CartLineItem,
            SavedItem,
            CartEvent,
            PriceBreakdown,
            Order,
            OrderType,
            OrderStatus,
            TimelineStep,
            DeliveryAddress,
            AddressForm,
            PaymentMethod,
            PaymentType,
            FavoriteItem,
            RegistrationForm,
            SearchResult,
            ResultKind,
            TypeFilter,
            PriceRange,
            SortOption,
            MerchantOrderStatus,
            Timeframe,
            SalesReport,
            TopItem,
            User,
            Merchant,
            MerchantProduct,
            MerchantOrder,
            MerchantOrderItem,
            AuthResponse,
            LoginRequest,
            OAuthProfile,
            OAuthTokenRequest,
            UpdateUserRequest,
            AddressList,
            PaymentMethodView,
            PaymentMethodList,
            FavoriteList,
            AddItemRequest,
            QuickAddRequest,
            QuantityChange,
            CartView,
            SavedList,
            CartCount,
            ShopList,
            ShopDetail,
            ProductQuoteRequest,
            ProductQuote,
            SearchResults,
            SearchHistory,
            CheckoutRequest,
            OrderList,
            OrderTracking,
            RegisterMerchantRequest,
            MerchantRegistered,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            OrderLineRequest,
            CreateMerchantOrderRequest,
            UpdateOrderStatusRequest,
            MerchantOrderWithItems,
            MerchantOrderList,
            ReportList,
            Meta,
            ApiResponse<Order>,
            ApiResponse<CartView>,
            ApiResponse<MerchantOrderWithItems>,
            ApiResponse<ReportList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and provider sign-in"),
        (name = "Account", description = "Profile, delivery addresses and payment methods"),
        (name = "Favorites", description = "Favorite products"),
        (name = "Catalog", description = "Shops and products"),
        (name = "Search", description = "Catalog search and search history"),
        (name = "Cart", description = "Cart and saved-for-later"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Merchant", description = "Merchant products, orders and reports"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
